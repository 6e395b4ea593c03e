mod changelog_dto;

pub use changelog_dto::ChangeLogResponseDto;
