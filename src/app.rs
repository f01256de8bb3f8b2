use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::catalog::Catalog;
use crate::cli::{Cli, Command, HomeCommand, VideosCommand};
use crate::config::{self, Config};
use crate::data::{FeedVideoService, OfflineVideoService, VideoService};
use crate::fetch::{ClientConfig, HttpFetcher};
use crate::render;
use crate::resolver::Resolver;

pub fn run(cli: Cli) -> Result<()> {
    let cfg = config::load(config::LoadOptions {
        config_file: cli.config.clone(),
        env_prefix: None,
    })
    .context("load config")?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Home(HomeCommand::default()));

    let output = match command {
        Command::About => render::about(&cfg.profile),
        Command::Contact => render::contact(&cfg.profile),
        Command::Socials => render::socials(&cfg.profile),
        Command::Home(cmd) => {
            let service = video_service(&cfg, cli.offline)?;
            home(&cfg, service.as_ref(), cmd)?
        }
        Command::Videos(cmd) => {
            let service = video_service(&cfg, cli.offline)?;
            videos(service.as_ref(), cmd)?
        }
    };

    print!("{output}");
    Ok(())
}

fn video_service(cfg: &Config, offline: bool) -> Result<Box<dyn VideoService>> {
    let fetcher = HttpFetcher::new(ClientConfig {
        user_agent: cfg.feed.user_agent.clone(),
        timeout: Some(cfg.feed.timeout),
        http_client: None,
    })
    .context("create feed client")?;
    let resolver = Arc::new(Resolver::new(cfg.resolver_settings(), Arc::new(fetcher)));

    Ok(if offline {
        Box::new(OfflineVideoService::new(resolver))
    } else {
        Box::new(FeedVideoService::new(resolver, cfg.profile.channel_id.clone()))
    })
}

fn home(cfg: &Config, service: &dyn VideoService, cmd: HomeCommand) -> Result<String> {
    let resolution = service.load_videos();
    let catalog = Catalog::new(resolution.videos);

    if cmd.open {
        if let Some(latest) = catalog.latest() {
            if let Err(err) = webbrowser::open(&latest.watch_url()) {
                warn!(error = %err, "failed to open browser");
            }
        }
    }

    if cmd.json {
        let end = cmd.count.min(catalog.all().len());
        return render::json(&catalog.all()[..end]);
    }
    Ok(render::home(
        &cfg.profile,
        &catalog,
        &resolution.source,
        cmd.count,
    ))
}

fn videos(service: &dyn VideoService, cmd: VideosCommand) -> Result<String> {
    let resolution = service.load_videos();
    let catalog = Catalog::new(resolution.videos);

    if cmd.json {
        let hits = catalog.search(cmd.search.as_deref().unwrap_or_default());
        return render::json(&hits);
    }
    Ok(render::videos(
        &catalog,
        &resolution.source,
        cmd.search.as_deref(),
    ))
}
