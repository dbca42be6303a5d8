// Sentence embeddings: model download, ONNX inference, and vector math.

pub mod download;
pub mod onnx;
pub mod traits;
pub mod vector;

pub use traits::{embed_all, Embedder};
