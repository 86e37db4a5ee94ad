pub mod stencil;

pub use stencil::differentiate;
