use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTarget {
    #[default]
    Home,
    Post,
    Rides,
    Profile,
}

impl NavTarget {
    /// Page the shell loads for this target. `Home` stays on the feed.
    #[must_use]
    pub const fn page(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::Post => Some("post-ride.html"),
            Self::Rides => Some("ride-track.html"),
            Self::Profile => Some("profile.html"),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Post => "post",
            Self::Rides => "rides",
            Self::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateOperation {
    pub page: String,
}

impl Operation for NavigateOperation {
    type Output = ();
}

pub struct Navigate<Ev> {
    context: CapabilityContext<NavigateOperation, Ev>,
}

impl<Ev> Capability<Ev> for Navigate<Ev> {
    type Operation = NavigateOperation;
    type MappedSelf<MappedEv> = Navigate<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Navigate::new(self.context.map_event(f))
    }
}

impl<Ev> Navigate<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<NavigateOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn to_page(&self, page: impl Into<String>) {
        let ctx = self.context.clone();
        let operation = NavigateOperation { page: page.into() };
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
