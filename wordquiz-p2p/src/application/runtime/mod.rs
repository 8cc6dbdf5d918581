mod dispatch_loop;

pub use dispatch_loop::DispatchLoop;
