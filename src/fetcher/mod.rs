// fetcher module — tracker API collaborators consumed by the filter core

pub mod github;
mod interface;
pub mod stub;

pub use github::GitHubFetcher;
pub use interface::Fetcher;
pub use stub::StubFetcher;
