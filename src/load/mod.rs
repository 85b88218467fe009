//! Reading the downloaded space from disk.

mod definition;
mod page_file;

pub use definition::{parse_definitions, read_definitions};
pub use page_file::{
    PAGE_FILE_EXTENSION, PAGE_FILE_PREFIX, load_pages, page_file_name, parse_page_file,
    read_page_file,
};
