//! Route guard for protected pages

use super::use_auth;
use crate::components::Spinner;
use yew::prelude::*;
use yew_router::prelude::*;

/// What a guarded route should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still being restored
    Wait,
    Render,
    Redirect,
}

pub const fn guard_decision(is_loading: bool, authenticated: bool) -> GuardDecision {
    match (is_loading, authenticated) {
        (true, _) => GuardDecision::Wait,
        (false, true) => GuardDecision::Render,
        (false, false) => GuardDecision::Redirect,
    }
}

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps<R: Routable> {
    /// Route to send signed-out visitors to
    pub login: R,
    #[prop_or_default]
    pub children: Children,
}

/// Renders its children only while a credential is stored
#[function_component(RequireAuth)]
pub fn require_auth<R>(props: &RequireAuthProps<R>) -> Html
where
    R: Routable + 'static,
{
    let auth = use_auth();

    match guard_decision(auth.is_loading, auth.service().is_authenticated()) {
        GuardDecision::Wait => html! {
            <Spinner text={"Checking authentication..."} />
        },
        GuardDecision::Render => html! { <>{ props.children.clone() }</> },
        GuardDecision::Redirect => html! { <Redirect<R> to={props.login.clone()} /> },
    }
}
