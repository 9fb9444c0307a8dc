use anyhow::Result;
use znn_transactions::TransactionDraft;
use znn_types::{Address, Amount, TokenStandard};

use crate::context::CommandContext;
use crate::output;
use crate::preflight;

pub async fn run(ctx: &CommandContext, to: &str, amount: &str, token: &str) -> Result<()> {
    let to: Address = to.parse()?;
    let token = TokenStandard::parse_identifier(token)?;
    let session = ctx.session()?;

    let info = session.client().account_info(&session.address).await?;
    let decimals = preflight::token_decimals(&info, &token)?;
    let amount = Amount::parse(amount, decimals)?;
    preflight::check_funds(&info, &token, amount)?;

    println!(
        "Sending {} to {to}",
        output::token_amount(amount, decimals, &token)
    );
    let published = session
        .submit(TransactionDraft::send(to, token, amount))
        .await?;
    println!("Done: {}", output::receipt(&published));
    Ok(())
}
