use crate::image_model::ImageModel;

pub mod batch;
pub mod env;
pub mod image_model;
pub mod prompt_table;

pub type ImgModBox = Box<dyn ImageModel + Send + Sync>;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
