pub mod configuration;
pub mod encoding_policy;
pub mod sdp;
pub mod transceiver_binder;
pub mod transport;

pub use encoding_policy::{EncodingPolicy, EncodingPolicyInput};
pub use transceiver_binder::TransceiverBinder;
pub use transport::RtpTransport;
