mod complex;
mod polynom;
pub mod root_finding;

pub use complex::Complex;
pub use polynom::Polynom;
pub use root_finding::unity_roots_polynom;
