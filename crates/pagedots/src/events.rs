use metaball::protocol::Request;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Control(Request),
    ConfigReload,
}

impl From<Request> for AppEvent {
    fn from(request: Request) -> Self {
        AppEvent::Control(request)
    }
}
