mod buffer_steps;
mod dispatch_steps;
mod transport_steps;
