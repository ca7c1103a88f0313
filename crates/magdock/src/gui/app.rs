use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::dock::{self, FrameStep, Point, Rect, Scene};
use crate::gui::theme::{self, DockColors};
use crate::gui::window;
use dockfx::{Dock, DockError, Phase, PointerEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct AppModel {
    pub dock: Rc<RefCell<Dock>>,
    pub colors: Rc<Cell<DockColors>>,
    pub config: Config,
    pub drawing_area: gtk::DrawingArea,
    /// Width reported by the monitor or the drawing area.
    pub detected_width: Option<f64>,
    /// Set when the current drag began outside the container.
    pub drag_denied: bool,
    pub last_x: f64,
}

#[derive(Debug)]
pub enum AppMsg {
    DragBegin(Point),
    DragUpdate(Point),
    DragEnd(Point),
    DragCancel,
    Resize(f64),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn container(&self) -> Rect {
        Scene::container_rect(
            self.dock.borrow().layout(),
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        )
    }

    fn feed(&mut self, phase: Phase, point: Point) {
        let event = PointerEvent::new(phase, point.x - self.container().x);
        self.last_x = event.x;
        if self.dock.borrow_mut().handle(event) {
            self.drawing_area.queue_draw();
        }
    }

    fn apply(&mut self, config: Config) -> Result<(), DockError> {
        let width = config.screen_width(self.detected_width);
        self.dock
            .borrow_mut()
            .reconfigure(&config.dock_settings(width))?;
        self.colors.set(DockColors::from_config(&config.colors));
        self.config = config;
        self.drawing_area.queue_draw();
        Ok(())
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Dock, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("magdock"),
            add_css_class: "magdock-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "magdock-drawing-area",

                connect_resize[sender] => move |_, width, _| {
                    sender.input(AppMsg::Resize(width as f64));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::DragBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::DragUpdate(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        let (x, y) = gesture.start_point().unwrap_or_default();
                        sender.input(AppMsg::DragEnd(Point::new(x + dx, y + dy)));
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::DragCancel);
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, dock, rx) = init;

        theme::load_css();
        window::init_placement(&root, config.screen.placement);

        let dock = Rc::new(RefCell::new(dock));
        let colors = Rc::new(Cell::new(DockColors::from_config(&config.colors)));

        let model = AppModel {
            dock: dock.clone(),
            colors: colors.clone(),
            config,
            drawing_area: gtk::DrawingArea::default(),
            detected_width: window::monitor_width(&root),
            drag_denied: false,
            last_x: 0.0,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        if let Err(e) = model.apply(config) {
            log::error!("Dock does not fit this monitor: {}", e);
        }

        let (dock_draw, colors_draw) = (dock.clone(), colors.clone());
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let state = dock_draw.borrow();
                let scene =
                    Scene::compute(state.layout(), &state.effects(), width as f64, height as f64);
                if let Err(e) = dock::draw(cr, &scene, &colors_draw.get()) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let frames = Cell::new(FrameStep::default());
        widgets.drawing_area.add_tick_callback(move |area, clock| {
            let mut step = frames.get();
            let dt = step.advance(clock.frame_time());
            let moving = dock.borrow_mut().tick(dt);
            if step.needs_redraw(moving) {
                area.queue_draw();
            }
            frames.set(step);
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.present();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::DragBegin(point) => {
                self.drag_denied = !self.container().contains(point);
                let phase = if self.drag_denied {
                    log::trace!("Drag began outside the dock at {:?}", point);
                    Phase::Fail
                } else {
                    Phase::Start
                };
                self.feed(phase, point);
            }
            AppMsg::DragUpdate(point) => {
                if !self.drag_denied {
                    self.feed(Phase::Move, point);
                }
            }
            AppMsg::DragEnd(point) => {
                self.feed(Phase::End, point);
                self.drag_denied = false;
            }
            AppMsg::DragCancel => {
                let event = PointerEvent::new(Phase::Cancel, self.last_x);
                if self.dock.borrow_mut().handle(event) {
                    self.drawing_area.queue_draw();
                }
                self.drag_denied = false;
            }
            AppMsg::Resize(width) => {
                if width <= 0.0 || self.detected_width == Some(width) {
                    return;
                }
                self.detected_width = Some(width);
                if self.config.screen.width.is_none()
                    && let Err(e) = self.apply(self.config)
                {
                    log::error!("Failed to resize dock to {}px: {}", width, e);
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match self.apply(new_config) {
                    Ok(()) => log::info!("Configuration reloaded"),
                    Err(e) => log::error!("Rejected reloaded config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}
