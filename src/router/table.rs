use super::route::Route;
use std::sync::Arc;

/// Ordered route storage.
///
/// Insertion order is registration order and match priority: earlier
/// routes win over later ones whenever both match a path.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route at the lowest priority.
    pub fn push(&mut self, route: Route) -> &Arc<Route> {
        let index = self.routes.len();
        self.routes.push(Arc::new(route));
        &self.routes[index]
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// First route, in priority order, that passes `accept` and whose
    /// pattern matches `path`, together with its named captures.
    pub fn first_match<'a, 'p, F>(
        &'a self,
        path: &'p str,
        mut accept: F,
    ) -> Option<(&'a Arc<Route>, Vec<(&'a str, &'p str)>)>
    where
        F: FnMut(&Route) -> bool,
    {
        self.routes.iter().find_map(|route| {
            if !accept(route) {
                return None;
            }
            route.pattern().captures(path).map(|caps| (route, caps))
        })
    }

    /// First route registered under `name`.
    pub fn by_name(&self, name: &str) -> Option<&Arc<Route>> {
        self.routes.iter().find(|route| route.name() == Some(name))
    }
}

impl FromIterator<Route> for RouteTable {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Arc<Route>;
    type IntoIter = std::slice::Iter<'a, Arc<Route>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
