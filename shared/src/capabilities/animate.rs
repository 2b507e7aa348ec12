use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Cosmetic transitions the shell plays after a render. The core never waits
/// for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationOperation {
    /// Cards slide in, `stagger_ms` apart, in the listed order.
    CardsEntered { keys: Vec<String>, stagger_ms: u64 },
    /// Short press pulse on one card.
    CardPressed { key: String },
}

impl Operation for AnimationOperation {
    type Output = ();
}

pub struct Animate<Ev> {
    context: CapabilityContext<AnimationOperation, Ev>,
}

impl<Ev> Capability<Ev> for Animate<Ev> {
    type Operation = AnimationOperation;
    type MappedSelf<MappedEv> = Animate<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Animate::new(self.context.map_event(f))
    }
}

impl<Ev> Animate<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<AnimationOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn cards_entered(&self, keys: Vec<String>, stagger_ms: u64) {
        if keys.is_empty() {
            return;
        }
        self.notify(AnimationOperation::CardsEntered { keys, stagger_ms });
    }

    pub fn card_pressed(&self, key: String) {
        self.notify(AnimationOperation::CardPressed { key });
    }

    fn notify(&self, operation: AnimationOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
