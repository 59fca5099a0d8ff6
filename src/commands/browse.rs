use anyhow::{Context, Result};

use hospital_directory::client::DirectoryClient;
use hospital_directory::config::Config;
use hospital_directory::directory::{
    resolve_overview, HospitalForm, HospitalList, CITY_OPTIONS, SPECIALTY_OPTIONS,
};
use hospital_directory::Hospital;

/// Fields for `add`
#[derive(Debug)]
pub struct AddParams {
    pub name: String,
    pub city: String,
    pub image: Option<String>,
    pub specialties: Vec<String>,
    pub rating: Option<f64>,
}

/// Build a client from config, with an optional URL override
pub fn client(config: &Config, api_url: Option<String>) -> Result<DirectoryClient> {
    let mut settings = config.client.clone();
    if let Some(url) = api_url {
        settings.base_url = url;
    }

    DirectoryClient::new(settings.to_client_config()).context("Failed to create API client")
}

pub async fn list(
    client: &DirectoryClient,
    search: Option<String>,
    city: Option<String>,
) -> Result<()> {
    let mut hospitals = HospitalList::new();
    hospitals
        .load(client)
        .await
        .context("Failed to load hospitals")?;

    if let Some(search) = search {
        hospitals.set_search(search);
    }
    if let Some(city) = city {
        hospitals.select_city(&city);
    }

    if let Some(message) = hospitals.empty_state() {
        println!("{message}");
        return Ok(());
    }

    println!(
        "Showing {} of {} hospitals:\n",
        hospitals.visible().len(),
        hospitals.hospitals().len()
    );
    for hospital in hospitals.visible() {
        print_summary(hospital);
    }

    Ok(())
}

pub async fn show(client: &DirectoryClient, id: &str) -> Result<()> {
    let overview = resolve_overview(client, id)
        .await
        .with_context(|| format!("Failed to load hospital {id}"))?;

    print_summary(&overview.hospital);
    println!("   Image: {}", overview.hospital.image);

    match &overview.details {
        Some(details) => {
            println!();
            if let Some(description) = &details.description {
                println!("   {description}");
            }
            println!("   Doctors: {}", details.number_of_doctors);
            println!("   Departments: {}", details.number_of_departments);
            for image in &details.images {
                println!("   Photo: {image}");
            }
        }
        None => println!("\n   No additional details yet."),
    }

    Ok(())
}

pub async fn add(client: &DirectoryClient, params: AddParams) -> Result<()> {
    let mut form = HospitalForm {
        name: params.name,
        city: params.city,
        ..HospitalForm::default()
    };
    if let Some(image) = params.image {
        form.image = image;
    }
    if let Some(rating) = params.rating {
        form.rating = rating;
    }
    for specialty in &params.specialties {
        form.toggle_specialty(specialty);
    }

    let created = client
        .create_hospital(&form.to_new_hospital())
        .await
        .context("Failed to create hospital")?;

    println!("Hospital created:");
    print_summary(&created);
    Ok(())
}

pub async fn delete(client: &DirectoryClient, id: &str) -> Result<()> {
    let response = client
        .delete_hospital(id)
        .await
        .with_context(|| format!("Failed to delete hospital {id}"))?;

    println!("{} ({})", response.message, response.id);
    Ok(())
}

pub fn cities() {
    println!("Cities:");
    for city in CITY_OPTIONS {
        println!("  {city}");
    }
    println!("\nSpecialties:");
    for specialty in SPECIALTY_OPTIONS {
        println!("  {specialty}");
    }
}

fn print_summary(hospital: &Hospital) {
    println!(
        "{} - {} ({:.1}/5)  [{}]",
        hospital.name, hospital.city, hospital.rating, hospital.id
    );
    if !hospital.specialty.is_empty() {
        println!("   Specialties: {}", hospital.specialty.join(", "));
    }
}
