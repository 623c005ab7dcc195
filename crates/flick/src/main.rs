mod gui;

use anyhow::Context;
use flick_core::config;
use flick_core::menu::MenuTree;
use flick_core::nav::Navigator;
use flick_core::session::Session;
use gui::app::AppModel;
use relm4::prelude::*;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_default();
    let nav = Navigator::new(Arc::new(MenuTree::default()), config.geometry)
        .context("Invalid geometry settings")?;
    let session = Session::new(nav, config.input).context("Invalid input settings")?;

    let app = RelmApp::new("org.flick.flick");
    app.run::<AppModel>(session);
    Ok(())
}
