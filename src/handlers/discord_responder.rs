use serenity::all::CommandInteraction;
use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::Colour;
use serenity::prelude::Context;
use tracing::warn;

/// Embed-shaped reply, independent of serenity so handlers can be tested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub ephemeral: bool,
}

impl Reply {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .colour(Colour::BLURPLE);
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        if let Some(url) = &self.image_url {
            embed = embed.image(url);
        }
        embed
    }
}

#[async_trait]
pub trait InteractionResponder: Send + Sync {
    async fn reply(&self, reply: Reply);
}

pub struct SerenityResponder<'a> {
    ctx: &'a Context,
    command: &'a CommandInteraction,
}

impl<'a> SerenityResponder<'a> {
    pub fn for_command(ctx: &'a Context, command: &'a CommandInteraction) -> Self {
        Self { ctx, command }
    }
}

#[async_trait]
impl InteractionResponder for SerenityResponder<'_> {
    async fn reply(&self, reply: Reply) {
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .embed(reply.to_embed())
                .ephemeral(reply.ephemeral),
        );
        if let Err(err) = self.command.create_response(&self.ctx.http, response).await {
            warn!(command = %self.command.data.name, ?err, "failed to respond to interaction");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let reply = Reply::new("Rat").image("https://a.png").ephemeral();
        assert_eq!(reply.title, "Rat");
        assert_eq!(reply.image_url.as_deref(), Some("https://a.png"));
        assert_eq!(reply.description, None);
        assert!(reply.ephemeral);
    }

    #[test]
    fn embed_carries_title_and_image() {
        let debug = format!("{:?}", Reply::new("Rat").image("https://a.png").to_embed());
        assert!(debug.contains("Rat"));
        assert!(debug.contains("https://a.png"));
    }
}
