use crate::gui::menu;
use crate::gui::theme::{self, ThemeColors};
use flick_core::geometry::Vec2;
use flick_core::session::{Release, Session};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const MENU_BUTTON: u32 = 3;
const SELECT_BUTTON: u32 = 1;

pub struct AppModel {
    pub session: Rc<RefCell<Session>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Press(u32, Vec2),
    Release(u32),
    CursorMove(Vec2),
    Cancel,
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = Session;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Flick"),
            set_default_size: (1280, 960),
            add_css_class: "flick-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Cancel);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "flick-drawing-area",

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::CursorMove(Vec2::new(x, y)));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 0, // Listen to all buttons
                        connect_pressed[sender] => move |gesture, _, x, y| {
                            sender.input(AppMsg::Press(gesture.current_button(), Vec2::new(x, y)));
                        },
                        connect_released[sender] => move |gesture, _, _, _| {
                            sender.input(AppMsg::Release(gesture.current_button()));
                        }
                    }
                }
            }
        }
    }

    fn init(
        session: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        theme::load_css();

        let model = AppModel {
            session: Rc::new(RefCell::new(session)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let session_draw = model.session.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &session_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let mut session = self.session.borrow_mut();
        let redraw = match msg {
            AppMsg::Press(MENU_BUTTON, pos) => {
                let viewport = Vec2::new(
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                session.menu_press(pos, viewport);
                true
            }
            AppMsg::Press(SELECT_BUTTON, _) => {
                session.select_press();
                false
            }
            AppMsg::Release(MENU_BUTTON) => session.menu_release() != Release::Ignored,
            AppMsg::Release(SELECT_BUTTON) => session.select_release() != Release::Ignored,
            AppMsg::Press(..) | AppMsg::Release(_) => false,
            AppMsg::CursorMove(pos) => session.pointer_moved(pos),
            AppMsg::Cancel => session.cancel(),
        };
        if redraw {
            self.drawing_area.queue_draw();
        }
    }
}
