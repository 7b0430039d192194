pub mod histogram;
pub mod indicators;
pub mod output;
pub mod pipeline;
pub mod sampler;
pub mod table;
