// Graph API access — page profile, insights, and the posts feed.

pub mod client;
pub mod page;
pub mod posts;

pub use client::{GraphApiError, GraphClient, DEFAULT_GRAPH_API_URL};
pub use page::{fetch_fan_growth, fetch_page_profile, PageInfo};
pub use posts::{fetch_post_insights, fetch_posts};
