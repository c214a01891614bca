//! Catalog entities: products, categories, and product photos.

mod category;
mod photo;
mod product;

pub use category::{
    Category, CategoryChanges, NewCategory, CATEGORY_DESCRIPTION_MAX_LEN, CATEGORY_NAME_MAX_LEN,
    CATEGORY_NAME_MIN_LEN,
};
pub use photo::{NewPhoto, Photo, StoredImage};
pub use product::{
    NewProduct, Product, ProductChanges, PRODUCT_CODE_MAX_LEN, PRODUCT_DESCRIPTION_MAX_LEN,
    PRODUCT_NAME_MAX_LEN, PRODUCT_NAME_MIN_LEN,
};
