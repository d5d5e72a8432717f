//! The full environment report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use envinfo_core::report::{FOOTER, HEADER};
use envinfo_core::{
    ConfigFileLocator, ConfiguredStores, EnvCacheStatus, EnvData, EnvReport, PhpBinary,
    ScopeStores, Settings, Sources, StoreProvider,
};

use crate::formatting::{print_error, print_key_value, print_section_header, SectionStyle};

pub fn cmd_info(
    root: PathBuf,
    settings: Settings,
    env_file: Option<PathBuf>,
    plain: bool,
) -> Result<()> {
    let env = match env_file {
        Some(path) => EnvData::from_file(&path),
        None => EnvData::load(&root),
    }
    .context("Failed to load environment data")?;

    let stores: Box<dyn StoreProvider> = match settings.site.stores {
        Some(ref names) => Box::new(ConfiguredStores::new(names.clone())),
        None => Box::new(ScopeStores::new(&root)),
    };
    let caches = EnvCacheStatus::new(&env);
    let php = PhpBinary::new(settings.php.binary.as_str());
    let locator = ConfigFileLocator::new(&settings.nginx)?;

    let sources = Sources {
        env: &env,
        stores: stores.as_ref(),
        caches: &caches,
        interpreter: &php,
        locator: &locator,
        base_url: settings.site.base_url.as_deref(),
    };
    let report = EnvReport::gather(&root, &sources)?;

    if plain {
        for line in report.render_plain() {
            println!("{}", line);
        }
        return Ok(());
    }

    println!();
    print_section_header(HEADER, SectionStyle::Primary);
    for field in report.fields() {
        for error in &field.errors {
            print_error(error);
        }
        print_key_value(field.label, &field.value);
    }
    println!();
    print_section_header(FOOTER, SectionStyle::Primary);

    Ok(())
}
