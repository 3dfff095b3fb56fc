use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `ezgpg which` command.
pub fn execute(ctx: &Context) -> Result<()> {
    println!("{}", ctx.gpg.binary().display());
    if !ctx.gpg.is_available() {
        output::warning("This binary could not be run. Install GnuPG or pass --gpg <path>.");
    }
    Ok(())
}
