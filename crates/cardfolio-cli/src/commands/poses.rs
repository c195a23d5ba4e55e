use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;

use cardfolio_core::layout::raw_poses;
use cardfolio_core::{AppConfig, ItemPose, StackLayoutEngine, Wallet};

/// One frame at 60 fps
const FRAME: Duration = Duration::from_micros(16_667);
/// Give up on settling after a minute of simulated frames
const MAX_FRAMES: usize = 3_600;

pub struct PoseArgs {
    pub progress: f64,
    pub active: Option<usize>,
    pub settle: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct PoseRow<'a> {
    index: usize,
    company: &'a str,
    #[serde(flatten)]
    pose: ItemPose,
}

pub fn run(config: &AppConfig, wallet: &Wallet, args: PoseArgs) -> Result<()> {
    if !args.progress.is_finite() {
        bail!("progress must be a finite number");
    }

    let (poses, frames) = if args.settle {
        settle(config, wallet, &args)?
    } else {
        (
            raw_poses(&config.stack, args.progress, wallet.len(), args.active),
            None,
        )
    };

    let rows: Vec<PoseRow> = wallet
        .iter()
        .zip(poses)
        .enumerate()
        .map(|(index, (card, pose))| PoseRow {
            index,
            company: &card.company,
            pose,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if let Some(frames) = frames {
        println!("Settled after {} frames\n", frames);
    }
    println!(
        "{:>3}  {:<24} {:>9} {:>7} {:>6} {:>8} {:>4}",
        "#", "company", "position", "depth", "scale", "opacity", "z"
    );
    for row in &rows {
        println!(
            "{:>3}  {:<24} {:>9.2} {:>7.1} {:>6.3} {:>8.3} {:>4}",
            row.index,
            row.company,
            row.pose.position,
            row.pose.depth,
            row.pose.scale,
            row.pose.opacity,
            row.pose.z_order
        );
    }

    Ok(())
}

/// Start every card off stage, then tick the springs to rest
fn settle(
    config: &AppConfig,
    wallet: &Wallet,
    args: &PoseArgs,
) -> Result<(Vec<ItemPose>, Option<usize>)> {
    let mut engine = StackLayoutEngine::from_config(config);
    engine.compute_poses(0.0, wallet.cards(), None);
    engine.compute_poses(args.progress, wallet.cards(), args.active);

    let mut frames = 0;
    while engine.tick(FRAME) {
        frames += 1;
        if frames >= MAX_FRAMES {
            bail!("springs did not settle within {} frames", MAX_FRAMES);
        }
    }

    Ok((engine.poses(), Some(frames)))
}
