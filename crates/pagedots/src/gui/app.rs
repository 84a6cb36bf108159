use crate::config;
use crate::events::AppEvent;
use crate::gui::dots::{self, FRAME_INTERVAL, State};
use crate::gui::snapshot;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use metaball::protocol::Request;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub visible: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    Step(i32),
    ToggleSweep,
    Tick,
    Control(Request),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Control(request) => AppMsg::Control(request),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Pagedots"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "pagedots-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    let msg = if key == gtk::gdk::Key::Left {
                        AppMsg::Step(-1)
                    } else if key == gtk::gdk::Key::Right {
                        AppMsg::Step(1)
                    } else if key == gtk::gdk::Key::space {
                        AppMsg::ToggleSweep
                    } else if key == gtk::gdk::Key::Escape {
                        AppMsg::Control(Request::Hide)
                    } else {
                        return glib::Propagation::Proceed;
                    };
                    sender.input(msg);
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "pagedots-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            visible: true,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        window::fit_to_indicator(&model.drawing_area, &state.borrow());

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let state = state_draw.borrow();
                let colors =
                    ThemeColors::from_context(&drawing_area.style_context(), &state.style);
                let plan = state.frame();
                if let Err(e) = dots::draw(cr, &plan, &colors, state.style.paint_mode) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        let ticker = sender.clone();
        glib::timeout_add_local(FRAME_INTERVAL, move || {
            ticker.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let now = Instant::now();
        let redraw = match msg {
            AppMsg::Resize(width, height) => {
                self.state
                    .borrow_mut()
                    .resize(width as f32, height as f32);
                true
            }
            AppMsg::Step(delta) => {
                self.state.borrow_mut().step(delta, now);
                true
            }
            AppMsg::ToggleSweep => {
                self.state.borrow_mut().toggle_sweep(now);
                true
            }
            AppMsg::Tick => self.visible && self.state.borrow_mut().tick(now),
            AppMsg::Control(request) => self.handle_request(request, now),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().reconfigure(&new_config);
                    window::fit_to_indicator(&self.drawing_area, &self.state.borrow());
                    log::info!("Configuration reloaded");
                    true
                }
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    false
                }
            },
        };

        if redraw {
            self.drawing_area.queue_draw();
        }
    }
}

impl AppModel {
    fn handle_request(&mut self, request: Request, now: Instant) -> bool {
        log::debug!("Control request: {}", request);
        let mut state = self.state.borrow_mut();
        match request {
            Request::Show => {
                self.visible = true;
                state.on_shown(now);
            }
            Request::Hide => {
                self.visible = false;
                state.on_hidden(now);
            }
            Request::Count(count) => {
                state.set_count(count);
                window::fit_to_indicator(&self.drawing_area, &state);
            }
            Request::Page(page) => state.go_to_page(page, now),
            Request::Scroll { page, offset } => state.scroll(page, offset),
            Request::Select(page) => state.select(page),
            Request::Sweep(on) => state.set_sweep(on, now),
            Request::Snapshot(path) => {
                drop(state);
                self.write_snapshot(&path);
                return false;
            }
        }
        self.visible
    }

    fn write_snapshot(&self, path: &Path) {
        let state = self.state.borrow();
        let colors = ThemeColors::from_context(&self.drawing_area.style_context(), &state.style);
        let size = window::surface_size(&self.drawing_area);
        match snapshot::write_png(path, size, &state.frame(), &colors, state.style.paint_mode) {
            Ok(()) => log::info!("Wrote snapshot to {}", path.display()),
            Err(e) => log::error!("Failed to write snapshot to {}: {}", path.display(), e),
        }
    }
}
