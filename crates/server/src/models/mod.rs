//! Domain models backing the repositories and routes.

pub mod book;
pub mod cart;
pub mod order;
pub mod review;
pub mod user;
pub mod wishlist;

pub use book::{Book, BookListItem};
pub use cart::{Cart, CartItem};
pub use order::{Order, OrderItem, ShippingAddress};
pub use review::{Review, ReviewWithAuthor};
pub use user::User;
pub use wishlist::WishlistBook;
