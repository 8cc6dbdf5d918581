mod peer;

pub use peer::PeerId;
