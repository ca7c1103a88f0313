pub mod app;
pub mod dock;
pub mod theme;
pub mod window;
