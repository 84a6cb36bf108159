use pagedots::config;
use pagedots::gui::app::AppModel;
use pagedots::gui::dots::State;
use pagedots::sys::runtime;
use relm4::prelude::*;
use std::time::Instant;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let state = State::new(&config, Instant::now());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.pagedots.Indicator");

    app.run::<AppModel>((state, rx));
}
