pub mod demo;
pub mod measure;
pub mod run;
