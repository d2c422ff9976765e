use crate::{
    adapters::csv,
    config::Config,
    dataset,
    gateways::{self, GeoCoder},
};
use anyhow::{bail, Context as _, Result};
use ausflug_core::{
    entities::TripId,
    gateways::render::MapRenderer,
    resolver::{AddressResolver, GeocodeCache},
    session::Session,
    usecases::{plan_page, Dataset, Page, PageContext, PagePlan},
};
use ausflug_gateways::{gpx::GpxFiles, leaflet::Leaflet};
use clap::{Parser, Subcommand};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    sync::Arc,
};
use strum::IntoEnumIterator;

const DEFAULT_OUTPUT_DIR: &str = "out";

#[derive(Parser)]
#[command(name = "ausflug")]
#[command(about = "Plan trips with camping spots, restaurants and hikes on interactive maps")]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all trips
    Trips,
    /// Render the map of a page into an HTML file
    Render {
        /// overview, camping, pois or restaurants
        #[arg(short, long, default_value_t = Page::Camping)]
        page: Page,
        /// Trip ID (default: the winner trip)
        #[arg(short, long)]
        trip: Option<u32>,
        /// Render every page of every trip
        #[arg(long, conflicts_with_all = ["page", "trip"])]
        all: bool,
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
    },
    /// Export the tables of a page as CSV files
    Export {
        /// camping, pois or restaurants
        #[arg(short, long)]
        page: Page,
        /// Trip ID (default: the winner trip)
        #[arg(short, long)]
        trip: Option<u32>,
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
    },
    /// Resolve addresses into coordinates
    Geocode {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

pub fn run() -> Result<()> {
    let Cli { config, command } = Cli::parse();
    let cfg = Config::try_load_from_file_or_default(config.as_deref())?;
    let dataset = dataset::load(cfg.dataset.file.as_deref())?;
    let mut app = App::new(cfg, dataset)?;
    match command {
        Command::Trips => app.list_trips(),
        Command::Render {
            page,
            trip,
            all,
            out,
        } => {
            if all {
                app.render_all(&out)
            } else {
                app.render(page, trip.map(TripId::new), &out)
            }
        }
        Command::Export { page, trip, out } => app.export(page, trip.map(TripId::new), &out),
        Command::Geocode { addresses } => {
            app.geocode(&addresses);
            Ok(())
        }
    }
}

struct App {
    cfg: Config,
    dataset: Dataset,
    resolver: AddressResolver<GeoCoder>,
    tracks: GpxFiles,
    renderer: Leaflet,
    session: Session,
}

impl App {
    fn new(cfg: Config, dataset: Dataset) -> Result<Self> {
        let cache = Arc::new(GeocodeCache::new(cfg.geocoding.cache_ttl));
        let resolver = AddressResolver::new(
            gateways::geocoding_gateway(&cfg.geocoding)?,
            cache,
            cfg.geocoding.min_delay,
        );
        let tracks = GpxFiles::new(&cfg.tracks.dir);
        let renderer = gateways::map_renderer(&cfg.map);
        Ok(Self {
            cfg,
            dataset,
            resolver,
            tracks,
            renderer,
            session: Session::default(),
        })
    }

    fn list_trips(&self) -> Result<()> {
        if self.dataset.trips.is_empty() {
            bail!("There are no trips");
        }
        for trip in &self.dataset.trips {
            let marker = if Some(trip.id) == self.dataset.default_trip {
                "*"
            } else {
                " "
            };
            println!(
                "{marker} {:>3}  {:<30} {}",
                trip.id.to_u32(),
                trip.name,
                trip.center
            );
        }
        Ok(())
    }

    fn plan(&mut self, page: Page, trip: Option<TripId>) -> Result<PagePlan> {
        let ctx = PageContext {
            resolver: &self.resolver,
            tracks: &self.tracks,
            settings: &self.cfg.map.settings,
        };
        let plan = plan_page(
            &ctx,
            &mut self.session,
            &self.dataset,
            page,
            trip,
            |done, total| log::info!("Geocoding {done}/{total}"),
        )?;
        report_failures(&plan);
        log::debug!(
            "Geocoder: {:?}, {} cached addresses",
            self.resolver.stats(),
            self.resolver.cache().len()
        );
        Ok(plan)
    }

    fn render(&mut self, page: Page, trip: Option<TripId>, out: &Path) -> Result<()> {
        let plan = self.plan(page, trip)?;
        let html = self
            .renderer
            .render(&plan.map)
            .with_context(|| format!("Unable to render map '{}'", plan.map.key))?;
        fs::create_dir_all(out)?;
        let file = out.join(format!("{page}_{}.html", plan.trip.id));
        fs::write(&file, html).with_context(|| format!("Unable to write {}", file.display()))?;
        println!(
            "{} ({}): {} markers -> {}",
            plan.trip.name,
            page,
            plan.map.marker_count(),
            file.display()
        );
        Ok(())
    }

    fn render_all(&mut self, out: &Path) -> Result<()> {
        let trip_ids: Vec<_> = self.dataset.trips.iter().map(|t| t.id).collect();
        for id in trip_ids {
            for page in Page::iter() {
                self.render(page, Some(id), out)?;
            }
        }
        Ok(())
    }

    fn export(&mut self, page: Page, trip: Option<TripId>, out: &Path) -> Result<()> {
        if page.table_kinds().is_empty() {
            bail!("The page '{page}' has no tables");
        }
        let plan = self.plan(page, trip)?;
        fs::create_dir_all(out)?;
        let file = out.join(format!("{page}.csv"));
        csv::write_places(create(&file)?, &plan.place_rows())?;
        println!("{} rows -> {}", plan.places.len(), file.display());
        if page.shows_hikes() {
            let file = out.join("hikes.csv");
            csv::write_hikes(create(&file)?, &plan.hike_rows())?;
            println!("{} rows -> {}", plan.hikes.len(), file.display());
        }
        Ok(())
    }

    fn geocode(&self, addresses: &[String]) {
        for addr in addresses {
            match self.resolver.resolve(Some(addr.as_str())) {
                Some(pos) => println!("{pos}\t{addr}"),
                None => println!("-\t{addr}"),
            }
        }
        let stats = self.resolver.stats();
        log::info!(
            "{} lookups ({} failed), {} cache hits",
            stats.lookups,
            stats.failed_lookups,
            stats.cache_hits
        );
    }
}

fn create(file: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(file).with_context(|| format!("Unable to create {}", file.display()))?;
    Ok(BufWriter::new(file))
}

fn report_failures(plan: &PagePlan) {
    if !plan.failed_places.is_empty() {
        println!(
            "{} Orte konnten nicht geocoded werden: {}",
            plan.failed_places.len(),
            plan.failed_places.join(", ")
        );
    }
    for failure in &plan.failed_tracks {
        println!(
            "GPX für '{}' konnte nicht geladen werden: {}",
            failure.name, failure.error
        );
    }
}
