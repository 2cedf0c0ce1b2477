//! tap — the classic mixing-tap demo for the rust_bp framework.
//!
//! Two source threads each want to add three drops of water (hot and cold),
//! an interleave thread forces strict alternation by blocking one event
//! while waiting for the other, and a display thread observes everything.
//! Neither source knows the other exists — the alternation emerges entirely
//! from the interleave thread's block sets.
//!
//! Run with `RUST_LOG=info cargo run -p tap` to see the round-by-round
//! arbitration decisions.

use anyhow::Result;

use bp_core::{EventSet, SyncSpec};
use bp_program::{ProgramBuilder, TraceObserver};
use bp_thread::BtHandle;

// ── Event vocabulary ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Tap {
    AddHot,
    AddCold,
}

const DROPS: usize = 3;

// ── Program ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let program = ProgramBuilder::new()
        .add("hot water", |bt: &mut BtHandle<Tap>| {
            for _ in 0..DROPS {
                bt.sync(SyncSpec::new().request(Tap::AddHot))?;
            }
            Ok(())
        })
        .add("cold water", |bt: &mut BtHandle<Tap>| {
            for _ in 0..DROPS {
                bt.sync(SyncSpec::new().request(Tap::AddCold))?;
            }
            Ok(())
        })
        .add("interleave", |bt: &mut BtHandle<Tap>| {
            for _ in 0..DROPS {
                bt.sync(SyncSpec::new().wait_for(Tap::AddHot).block(Tap::AddCold))?;
                bt.sync(SyncSpec::new().wait_for(Tap::AddCold).block(Tap::AddHot))?;
            }
            Ok(())
        })
        .add("display", |bt: &mut BtHandle<Tap>| {
            // A pure waiter: shut down by the coordinator once the sources
            // and the interleave thread are done.
            loop {
                let drop = bt.sync(SyncSpec::new().wait_for(EventSet::all()))?;
                println!("[{}] turned water tap: {drop:?}", bt.name());
            }
        })
        .build()?;

    let outcome = program.run_with(&mut TraceObserver)?;
    println!("run finished: {outcome:?}");
    Ok(())
}
