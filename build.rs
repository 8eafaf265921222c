use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Outside a git checkout the git instructions fall back to placeholder values.
    vergen_gitcl::Emitter::default()
        .add_instructions(
            &vergen_gitcl::BuildBuilder::default()
                .build_date(true)
                .build()?,
        )?
        .add_instructions(
            &vergen_gitcl::CargoBuilder::default()
                .target_triple(true)
                .build()?,
        )?
        .add_instructions(
            &vergen_gitcl::GitclBuilder::default()
                .sha(true)
                .dirty(true)
                .build()?,
        )?
        .emit()?;
    Ok(())
}
