use anyhow::Result;

use cardfolio_core::Wallet;

pub fn run(wallet: &Wallet) -> Result<()> {
    if wallet.is_empty() {
        println!("No cards saved yet.");
        return Ok(());
    }

    println!("Cards ({}):\n", wallet.len());

    for (index, card) in wallet.iter().enumerate() {
        println!("  {}. {} - {} ({})", index + 1, card.company, card.owner, card.role);
        println!("    Route: {}", card.navigation_target());
        if let Some(saved_at) = card.saved_at {
            println!("    Saved: {}", saved_at.format("%Y-%m-%d %H:%M"));
        }
        println!();
    }

    Ok(())
}
