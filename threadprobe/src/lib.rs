pub use threadprobe_ffi::*;
pub use threadprobe_macro::*;

pub mod logger;
pub mod spawner;

pub mod internal {
	pub use threadprobe_ffi::API_VERSION;
}
