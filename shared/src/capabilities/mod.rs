mod animate;
mod navigate;

pub use self::animate::{Animate, AnimationOperation};
pub use self::navigate::{NavTarget, Navigate, NavigateOperation};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub animate: Animate<Event>,
    pub navigate: Navigate<Event>,
}
