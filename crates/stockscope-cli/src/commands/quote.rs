use crate::cli::SymbolArgs;
use crate::error::CliError;

use super::{CommandOutput, Context};

pub async fn run(args: &SymbolArgs, context: &Context) -> Result<CommandOutput, CliError> {
    let renderer = context.renderer();

    match context.gateway.quote(&args.symbol, &context.api_key).await {
        Ok(quote) => Ok(CommandOutput::ok(
            serde_json::to_value(&quote)?,
            renderer.quote(&quote),
        )),
        Err(error) => Ok(CommandOutput::failed(error, &renderer)),
    }
}
