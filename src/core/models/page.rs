use serde::Serialize;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::core::errors::StorefrontError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `DESC` in any case sorts descending; every other value sorts ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductSortField {
    Id,
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for ProductSortField {
    type Err = StorefrontError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(ProductSortField::Id),
            "name" => Ok(ProductSortField::Name),
            "price" => Ok(ProductSortField::Price),
            "createdAt" | "created_at" => Ok(ProductSortField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(ProductSortField::UpdatedAt),
            other => Err(StorefrontError::Validation(format!("Unknown sort field: {}", other))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: ProductSortField,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            field: ProductSortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: Sort) -> Result<Self, StorefrontError> {
        let request = PageRequest { page, size, sort };
        request.validate()?;
        Ok(request)
    }

    /// Fields are public, so requests built as literals are re-checked here.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.size == 0 {
            return Err(StorefrontError::Validation(
                "Page size must not be less than one".to_string(),
            ));
        }
        Ok(())
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Zero-based page index
    pub number: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let total_pages = match request.size {
            0 => 0,
            size => total_elements.div_ceil(u64::from(size)),
        };
        Page {
            content,
            total_elements,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            number: request.page,
            size: request.size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}
