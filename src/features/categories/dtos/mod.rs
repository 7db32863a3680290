mod category_dto;

pub use category_dto::{
    CategoryOptionDto, CategoryPayload, CategoryRowDto, CreateCategoryDto, UpdateCategoryDto,
};
