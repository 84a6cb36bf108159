pub mod config;
pub mod events;

pub mod gui {
    pub mod app;
    pub mod dots;
    pub mod snapshot;
    pub mod theme;
    pub mod window;
}

pub mod sys {
    pub mod runtime;
    pub mod server;
    pub mod watcher;
}
