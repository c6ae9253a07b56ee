use utoipa::OpenApi;

use crate::modules::classes::model::{
    BulkDeleteResponse, BulkIdsDto, Class, ClassOption, CreateClassDto, PaginatedClassesResponse,
    UpdateClassDto,
};
use crate::modules::navigation::model::{NavigationGroup, NavigationItem, NavigationResponse};
use crate::modules::sections::model::{
    CreateSectionDto, PaginatedSectionsResponse, Section, SectionOption, UpdateSectionDto,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, UpdateStudentDto,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class_options,
        crate::modules::classes::controller::get_class_by_id,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::classes::controller::bulk_delete_classes,
        crate::modules::sections::controller::create_section,
        crate::modules::sections::controller::get_sections,
        crate::modules::sections::controller::get_section_options,
        crate::modules::sections::controller::get_section_by_id,
        crate::modules::sections::controller::update_section,
        crate::modules::sections::controller::delete_section,
        crate::modules::sections::controller::bulk_delete_sections,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student_by_id,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::bulk_delete_students,
        crate::modules::students::controller::export_students,
        crate::modules::navigation::controller::get_navigation,
    ),
    components(
        schemas(
            Class,
            ClassOption,
            CreateClassDto,
            UpdateClassDto,
            PaginatedClassesResponse,
            Section,
            SectionOption,
            CreateSectionDto,
            UpdateSectionDto,
            PaginatedSectionsResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            BulkIdsDto,
            BulkDeleteResponse,
            NavigationResponse,
            NavigationGroup,
            NavigationItem,
            PaginationMeta,
            PaginationParams,
        )
    ),
    tags(
        (name = "Classes", description = "Class management endpoints"),
        (name = "Sections", description = "Section management endpoints"),
        (name = "Students", description = "Student management and export endpoints"),
        (name = "Navigation", description = "Admin navigation metadata")
    ),
    info(
        title = "Classtrack API",
        version = "0.1.0",
        description = "A school administration REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
