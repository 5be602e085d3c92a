// src/ui/router.rs
use crate::auth::Access;
use crate::ui::{
    layout::Layout,
    pages::{
        BlogDetail as BlogDetailPage, Blogs as BlogsPage, Categories as CategoriesPage, Dashboard as DashboardPage,
        Discounts as DiscountsPage, Forbidden, Login as LoginPage, NotFound as NotFoundPage,
        OrderDetail as OrderDetailPage, Orders as OrdersPage, Products as ProductsPage,
        Profile as ProfilePage,
    },
    state::use_app_state,
};
use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

#[derive(Clone,Routable,Debug,PartialEq)]
#[rustfmt::skip]
pub enum Route{
    #[route("/")]
    Home{},
    #[route("/admin/login")]
    Login{},
    #[route("/admin")]
    Dashboard{},
    #[route("/admin/product")]
    Products{},
    #[route("/admin/manage-category")]
    Categories{},
    #[route("/admin/discount")]
    Discounts{},
    #[route("/admin/orders?:..query")]
    Orders{query:String},
    #[route("/admin/order-detail/:order_id")]
    OrderDetail{order_id:String},
    #[route("/admin/blog/list")]
    Blogs{},
    #[route("/admin/blog/detail/:slug")]
    BlogDetail{slug:String},
    #[route("/admin/profile")]
    Profile{},
    #[route("/:..segments")]
    NotFound{segments:Vec<String>},
}

#[component]
pub fn Home() -> Element {
    rsx! {
        AuthenticatedLayout{
            DashboardPage{}
        }
    }
}

#[component]
pub fn Login() -> Element {
    rsx! {
        div{
            class:"min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4 sm:px-6 lg:px-8",
            LoginPage{}
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        AuthenticatedLayout{
            DashboardPage{}
        }
    }
}

#[component]
pub fn Products() -> Element {
    rsx! {
        AuthenticatedLayout{
            ProductsPage{}
        }
    }
}

#[component]
pub fn Categories() -> Element {
    rsx! {
        AuthenticatedLayout{
            CategoriesPage{}
        }
    }
}

#[component]
pub fn Discounts() -> Element {
    rsx! {
        AuthenticatedLayout{
            DiscountsPage{}
        }
    }
}

#[component]
pub fn Orders(query: String) -> Element {
    rsx! {
        AuthenticatedLayout{
            OrdersPage{query}
        }
    }
}

#[component]
pub fn OrderDetail(order_id: String) -> Element {
    let key = format!("order-{}", order_id);
    rsx! {
        AuthenticatedLayout{
            key: key,
            OrderDetailPage{order_id}
        }
    }
}

#[component]
pub fn Blogs() -> Element {
    rsx! {
        AuthenticatedLayout{
            BlogsPage{}
        }
    }
}

#[component]
pub fn BlogDetail(slug: String) -> Element {
    rsx! {
        AuthenticatedLayout{
            key: "blog-{slug}",
            BlogDetailPage{slug: slug.clone()}
        }
    }
}

#[component]
pub fn Profile() -> Element {
    rsx! {
        AuthenticatedLayout{
            ProfilePage{}
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div{
            class:"min-h-screen flex items-center justify-center bg-gray-50",
            NotFoundPage{path:path}
        }
    }
}

/// Admin-only shell: pending while the session check runs, login when
/// signed out, forbidden for a non-admin account
#[component]
pub fn AuthenticatedLayout(children: Element) -> Element {
    let app_state = use_app_state();
    let navigator = use_navigator();
    let access = app_state.auth.access();

    use_effect(use_reactive!(|access| {
        if access == Access::NotLoggedIn {
            let _ = navigator.replace(Route::Login {});
        }
    }));

    match access {
        Access::Granted => rsx! {
            Layout{
                {children}
            }
        },
        Access::Forbidden => rsx! {Forbidden{}},
        Access::Pending | Access::NotLoggedIn => rsx! {
            div{class:"min-h-screen flex flex-col items-center justify-center bg-gray-50",
                div{class:"animate-spin rounded-full h-16 w-16 border-b-2 border-blue-600"}
                p{class:"mt-4 text-gray-600",
                    if access == Access::Pending {"Checking session..."} else {"Redirecting to login..."}
                }
            }
        },
    }
}

pub mod nav {
    use super::*;

    pub fn is_active_route(current: &Route, target: &Route) -> bool {
        std::mem::discriminant(current) == std::mem::discriminant(target)
    }

    pub fn route_title(route: &Route) -> &'static str {
        match route {
            Route::Home { .. } | Route::Dashboard { .. } => "Dashboard",
            Route::Login { .. } => "Login",
            Route::Products { .. } => "Products",
            Route::Categories { .. } => "Manage category",
            Route::Discounts { .. } => "Discount",
            Route::Orders { .. } => "Orders",
            Route::OrderDetail { .. } => "Order detail",
            Route::Blogs { .. } => "Blog list",
            Route::BlogDetail { .. } => "Blog detail",
            Route::Profile { .. } => "Profile",
            Route::NotFound { .. } => "Not Found",
        }
    }

    /// Breadcrumb labels from the path segments, `/admin/order-detail/42` → `Admin / Order detail / 42`
    pub fn breadcrumb(path: &str) -> Vec<String> {
        path.split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| {
                let words = segment.replace('-', " ");
                crate::catalog::category::capitalize(&words)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_equality() {
        let route1 = Route::Dashboard {};
        let route2 = Route::Dashboard {};
        assert_eq!(route1, route2);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Products {}.to_string(), "/admin/product");
        assert_eq!(
            Route::OrderDetail { order_id: "42".to_string() }.to_string(),
            "/admin/order-detail/42"
        );
        assert_eq!(
            "/admin/manage-category".parse::<Route>().unwrap(),
            Route::Categories {}
        );
        assert_eq!(
            "/admin/blog/detail/summer-linen".parse::<Route>().unwrap(),
            Route::BlogDetail { slug: "summer-linen".to_string() }
        );
        assert_eq!(nav::route_title(&Route::BlogDetail { slug: "x".to_string() }), "Blog detail");
        assert!(matches!(
            "/admin/nowhere".parse::<Route>().unwrap(),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn test_route_title() {
        assert_eq!(nav::route_title(&Route::Dashboard {}), "Dashboard");
        assert_eq!(nav::route_title(&Route::Categories {}), "Manage category");
    }

    #[test]
    fn test_breadcrumb() {
        assert_eq!(
            nav::breadcrumb("/admin/order-detail/42"),
            vec!["Admin", "Order detail", "42"]
        );
        assert_eq!(nav::breadcrumb("/admin/orders?page=2"), vec!["Admin", "Orders"]);
        assert!(nav::breadcrumb("/").is_empty());
    }

    #[test]
    fn test_active_route_ignores_params() {
        assert!(nav::is_active_route(
            &Route::Orders { query: "page=2".to_string() },
            &Route::Orders { query: String::new() }
        ));
    }
}
