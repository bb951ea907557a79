use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, WheelState};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub visible: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Spin(Option<usize>),
    Click(u32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Spin(target) => AppMsg::Spin(target),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (WheelState, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fortuna"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "fortuna-window",
            set_decorated: false,
            set_default_width: wheel::WINDOW_SIZE,
            set_default_height: wheel::WINDOW_SIZE,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "fortuna-wheel",

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_released[sender] => move |gesture, _, _, _| {
                        sender.input(AppMsg::Click(gesture.current_button()));
                    }
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

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let state = state_draw.borrow();
                if let Err(e) = wheel::draw(cr, &state, &colors, f64::from(width), f64::from(height))
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.visible = false;
            }
            AppMsg::Spin(target) => {
                self.spin(target);
            }
            AppMsg::Click(btn) => {
                if !self.visible {
                    return;
                }
                match btn {
                    1 => self.spin(None),
                    3 => self.visible = false,
                    _ => {}
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let result = self.state.borrow_mut().reload(&new_config);
                    match result {
                        Ok(()) => {
                            self.drawing_area.queue_draw();
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::error!("Invalid configuration: {}", e),
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn spin(&mut self, target: Option<usize>) {
        let was_spinning = {
            let mut state = self.state.borrow_mut();
            let was_spinning = state.is_spinning();
            match state.begin_spin(target) {
                Ok(index) => log::info!("Spinning to section {}", index),
                Err(e) => {
                    log::error!("Spin request rejected: {}", e);
                    return;
                }
            }
            was_spinning
        };

        // One ticker drives any number of consecutive spins; only install a
        // new one when the wheel was at rest.
        if !was_spinning {
            let state = self.state.clone();
            self.drawing_area.add_tick_callback(move |area, clock| {
                let action = state.borrow_mut().tick(clock.frame_time());
                if action.should_redraw {
                    area.queue_draw();
                }
                if let Some(index) = action.landed {
                    log::info!("Landed on section {}", index);
                }
                if action.running {
                    glib::ControlFlow::Continue
                } else {
                    glib::ControlFlow::Break
                }
            });
        }
    }
}
