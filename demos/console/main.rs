use std::sync::Arc;

use sigmap::{
    Config, ConsoleBuilder,
    api::MemTransport,
    config::API_URL_ENV,
    draft::Field,
    model::{Action, ComboKey},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> sigmap::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let builder = ConsoleBuilder::from_config(Config::default().with_env());
    let console = if std::env::var(API_URL_ENV).is_ok() {
        builder.build()?
    } else {
        let mem = MemTransport::new().with_signal("jaw", vec![Action::new("clenched", Some(0)), Action::new("relaxed", Some(1))]);
        builder.transport(Arc::new(mem)).build()?
    };
    println!("Healthy: {}", console.health().await?);

    let mut directory = console.directory().await?;
    if directory.get("hand").is_none() {
        directory.create("hand", "").await?;
    }
    for signal in directory.list() {
        println!("Signal {}: {:?}", signal.name, signal.states());
    }

    let mut hand = console.open_signal("hand").await?;
    for (name, bit) in [("open", "0"), ("closed", "1")] {
        if let Some(row) = hand.add_row().applied() {
            hand.update_field(row, Field::Name, name)?;
            hand.update_field(row, Field::Bit, bit)?;
        }
    }
    println!("Saved: {}, lock: {}", hand.save().await?, hand.lock_state().as_ref());

    let mut mapping = console.open_mapping("hand").await?;
    for row in mapping.rows() {
        println!("{} ({}) = {:?}", row.key, row.combination.other_signal, row.input);
    }
    let key = ComboKey::new("closed", "clenched");
    if mapping.input(&key).is_some() {
        mapping.set_input(&key, "grip, hold")?;
        println!("Mapped {} to {:?}", key, mapping.save(&key).await?);
    }

    for toast in console.notifications().active() {
        println!("[{}] {}", toast.kind.as_ref(), toast.message);
    }
    Ok(())
}
