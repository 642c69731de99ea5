pub(crate) mod ai_model;
