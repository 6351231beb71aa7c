//! A label whose margin and background follow the window width.
//!
//! Run with: RUST_LOG=sizeclass=debug cargo run -p sizeclass --example styled_text

use sizeclass::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct TextStyle {
    margin_top: Option<u16>,
    background: Option<&'static str>,
}

fn label_style(
    margin_top: &Query<&'static str, u16>,
    background: &Query<&'static str, &'static str>,
) -> Result<TextStyle, BreakpointError> {
    Ok(TextStyle {
        margin_top: context::value(margin_top)?,
        background: context::value(background)?,
    })
}

fn main() -> Result<(), BreakpointError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let table = BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)])?;
    let margin_top = Query::new().at("mobile", 20).at("desktop", 50);
    let background = Query::new().at("mobile", "red").at("tablet", "green");

    let window_width = Observable::new(375.0);
    let provider = BreakpointProvider::new(table, &window_width);
    let _log = provider.subscribe(|ctx| println!("  -> class changed to {:?}", ctx.active()));

    println!("{:>6}  {:<8}  style", "width", "class");
    for width in [375.0, 720.0, 1024.0, 1280.0, 1920.0, 600.0] {
        window_width.set(width);
        let style = provider.scope(|_| label_style(&margin_top, &background))?;
        let class = provider.active().unwrap_or("-");
        println!("{width:>6}  {class:<8}  {style:?}");
    }
    Ok(())
}
