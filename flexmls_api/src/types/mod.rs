mod response;
pub use self::response::ApiResponse;

mod paging;
pub use self::paging::Paging;

mod collection;
pub use self::collection::{ResponseCollection, Results};
