use std::rc::Rc;

use slotreel_core::{
    ConnectedFlag, EngineConfig, MemorySlots, ReelEngine, SeededRandom, Silent, TokioRuntime,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Example end-to-end spin on an in-memory display
    let slots = Rc::new(MemorySlots::new(4));
    let engine = ReelEngine::new(
        EngineConfig::default(),
        slots.clone(),
        Rc::new(ConnectedFlag::new(true)),
        Rc::new(Silent),
        Rc::new(TokioRuntime),
        Box::new(SeededRandom::new(1)),
    )?;
    let outcome = tokio::task::LocalSet::new()
        .run_until(engine.spin())
        .await?;
    println!(
        "indices={:?} win={:?} text={}",
        outcome.indices, outcome.win, outcome.text
    );
    Ok(())
}
