pub(crate) mod progress;
pub(crate) mod quiz_scoring;
pub(crate) mod seed;
