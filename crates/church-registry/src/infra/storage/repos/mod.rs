//! SeaORM-backed repository implementations.

pub mod church_pastors;
pub mod church_roles;
pub mod churches;
pub mod districts;
pub mod pastors;
pub mod sections;

pub use church_pastors::SeaOrmChurchPastorsRepository;
pub use church_roles::SeaOrmChurchRolesRepository;
pub use churches::SeaOrmChurchesRepository;
pub use districts::SeaOrmDistrictsRepository;
pub use pastors::SeaOrmPastorsRepository;
pub use sections::SeaOrmSectionsRepository;

use sea_orm::Order;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};

use crate::domain::query::Direction;

/// Case-insensitive substring match on a (possibly joined) column.
pub(crate) fn icontains<C>(col: C, term: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(col))).like(format!("%{}%", term.to_lowercase()))
}

pub(crate) fn sort_order(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}
