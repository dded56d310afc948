pub mod activity_repo;
pub mod article_repo;
pub mod employee_repo;
pub mod section_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepository;
pub use article_repo::ArticleRepository;
pub use employee_repo::EmployeeRepository;
pub use section_repo::SectionRepository;
pub use user_repo::UserRepository;
