//! Image encoding for PDF embedding.
//!
//! Page images are embedded losslessly by default. When file size matters
//! more than fidelity, the PDF canvas can embed them as JPEG instead using
//! [`encode_jpeg`].

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
