/*
 * Defines how the selection metadata looks up the attributes of an item by its
 * identifier. The lookup is expected to be synchronous and cheap (a local map or
 * cursor query). Returning `None` means the identifier is unknown or stale.
 */
use super::document_record::ItemAttributes;
use std::rc::Rc;

pub trait AttributeResolverOperations {
    fn resolve_attributes(&self, item_id: &str) -> Option<ItemAttributes>;
}

impl<T: AttributeResolverOperations + ?Sized> AttributeResolverOperations for &T {
    fn resolve_attributes(&self, item_id: &str) -> Option<ItemAttributes> {
        (**self).resolve_attributes(item_id)
    }
}

impl<T: AttributeResolverOperations + ?Sized> AttributeResolverOperations for Rc<T> {
    fn resolve_attributes(&self, item_id: &str) -> Option<ItemAttributes> {
        (**self).resolve_attributes(item_id)
    }
}

/*
 * Adapts a plain function or closure into a resolver, for callers whose backing
 * store is simplest to capture in a closure.
 */
pub struct ResolverFn<F>(pub F);

impl<F> AttributeResolverOperations for ResolverFn<F>
where
    F: Fn(&str) -> Option<ItemAttributes>,
{
    fn resolve_attributes(&self, item_id: &str) -> Option<ItemAttributes> {
        (self.0)(item_id)
    }
}
