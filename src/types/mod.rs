mod device_class;
mod device_info;
mod frame_style;
mod image;
mod orientation;

pub use device_class::*;
pub use device_info::*;
pub use frame_style::*;
pub use image::*;
pub use orientation::*;
