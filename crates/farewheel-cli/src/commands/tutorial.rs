use anyhow::Result;

use farewheel_core::{AppConfig, FlagStore, JsonFlagStore, TUTORIAL_SHOWN_KEY};

pub fn reset(config: &AppConfig) -> Result<()> {
    let mut store = JsonFlagStore::new(config.state_path());
    store.clear(TUTORIAL_SHOWN_KEY)?;
    println!("The swipe hint will show on next launch.");
    Ok(())
}

pub fn status(config: &AppConfig) -> Result<()> {
    let store = JsonFlagStore::new(config.state_path());
    if store.is_set(TUTORIAL_SHOWN_KEY)? {
        println!("Swipe hint: shown");
    } else {
        println!("Swipe hint: not shown yet");
    }
    println!("State file: {}", store.path().display());
    Ok(())
}
