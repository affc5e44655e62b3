use std::error::Error;
use std::sync::Arc;

use threadbolt::database::Database;
use threadbolt::prelude::*;

trait ArticleStore: Send + Sync {
    fn titles(&self) -> Vec<String>;
}

struct InMemoryArticles {
    titles: Vec<String>,
}

impl ArticleStore for InMemoryArticles {
    fn titles(&self) -> Vec<String> {
        self.titles.clone()
    }
}

/// The store is registered behind a trait object, wrapped in a sized handle.
struct Articles(Arc<dyn ArticleStore>);

struct ArticlesModule;

impl Module for ArticlesModule {
    fn configure(
        &self,
        registry: &ServiceRegistry,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let store = InMemoryArticles {
            titles: vec![
                String::from("Hello, ThreadBolt"),
                String::from("Injecting services"),
            ],
        };
        registry.register("articles", Arc::new(Articles(Arc::new(store))));
        Ok(())
    }
}

#[derive(Default, Injectable)]
struct ArticleController {
    #[inject("db")]
    db: Option<Arc<Database>>,
    #[inject]
    articles: Option<Arc<Articles>>,
}

impl ArticleController {
    fn index(&self) -> String {
        let driver = self.db.as_ref().map(|db| db.driver().to_string());
        let titles = self
            .articles
            .as_ref()
            .map(|articles| articles.0.titles())
            .unwrap_or_default();
        format!("[{}] {}", driver.unwrap_or_default(), titles.join(", "))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::load()?;
    threadbolt::logging::init(&settings.logging)?;

    let app = App::builder(settings).module(ArticlesModule).build()?;

    let mut controller = ArticleController::default();
    app.inject(&mut controller)?;
    println!("{}", controller.index());

    Ok(())
}
