use sea_orm::{
    Condition, EntityTrait, QueryFilter, Select,
    sea_query::{Expr, Func, LikeExpr},
};

const LIKE_ESCAPE: char = '\\';

/// Build a `%needle%` LIKE pattern where `%`, `_` and the escape character in
/// `needle` match literally. The needle is used as given.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Patterns to compare against `LOWER(column)`.
///
/// SQLite's `LOWER` folds ASCII only while Postgres folds Unicode, so the
/// needle is folded both ways. The Unicode variant is omitted when it adds
/// nothing.
pub fn contains_patterns(needle: &str) -> Vec<String> {
    let ascii = needle.to_ascii_lowercase();
    let unicode = needle.to_lowercase();
    if ascii == unicode {
        vec![contains_pattern(&ascii)]
    } else {
        vec![contains_pattern(&ascii), contains_pattern(&unicode)]
    }
}

/// Case-insensitive substring filter over several columns, OR-ed together.
pub trait FilterContainsAny<E: EntityTrait> {
    fn filter_contains_any(self, columns: &[E::Column], needle: &str) -> Self;
}

impl<E> FilterContainsAny<E> for Select<E>
where
    E: EntityTrait,
{
    fn filter_contains_any(self, columns: &[E::Column], needle: &str) -> Self {
        let patterns = contains_patterns(needle);
        let mut condition = Condition::any();
        for column in columns {
            for pattern in &patterns {
                condition = condition.add(
                    Expr::expr(Func::lower(Expr::col((E::default(), *column))))
                        .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
                );
            }
        }
        QueryFilter::filter(self, condition)
    }
}
