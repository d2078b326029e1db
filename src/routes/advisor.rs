use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

use crate::config::AdvisorSettings;
use crate::core::{classify_intent, profile, Advisor};
use crate::models::{
    AnalysisMetadata, AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse, PetProfile,
    Product, RecommendMetadata, RecommendRequest, RecommendResponse,
};
use crate::services::{
    AnalysisType, AuditStore, CacheKey, CacheManager, CatalogClient, NewAnalysisRecord,
    ProfileExtractor, VaultNotifier,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub cache: Arc<CacheManager>,
    pub audit: Arc<AuditStore>,
    pub vault: Arc<VaultNotifier>,
    pub extractor: Arc<ProfileExtractor>,
    pub advisor: Advisor,
    pub limits: AdvisorSettings,
}

/// Configure all advisor routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/advisor/recommend", web::post().to(recommend))
        .route("/advisor/analyze", web::post().to(analyze))
        .route("/advisor/history/{pet_name}", web::get().to(get_history));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.audit.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Product recommendation endpoint
///
/// POST /api/v1/advisor/recommend
///
/// Request body:
/// ```json
/// {
///   "pet": {"name": "Mimi", "species": "cat", "age": 3, "healthScore": 85,
///           "allergies": ["chicken"]},
///   "query": "what food should she eat",
///   "budget": {"min": 10, "max": 50},
///   "topN": 5
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // A pet without a species is a usage error, never silently defaulted
    let pet = match req.pet.clone().into_profile() {
        Ok(pet) => pet,
        Err(e) => {
            tracing::info!("Rejecting recommend request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid input".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let top_n = req.top_n.min(state.limits.max_top_n) as usize;
    let started = Instant::now();

    // Narrow the catalog fetch when the query carries a recognizable intent
    let category = req
        .query
        .as_deref()
        .and_then(|query| classify_intent(query).category);

    tracing::info!(
        "Recommending for pet: {}, species: {}, category: {:?}, topN: {}",
        pet.name,
        pet.species,
        category,
        top_n
    );

    // Cache-aside around the catalog fetch; budget-constrained fetches bypass
    // the shared candidate cache
    let cache_key = CacheKey::candidates(pet.species, category);
    let cached: Option<Vec<Product>> = if req.budget.is_none() {
        state.cache.get(&cache_key).await.ok()
    } else {
        None
    };

    let candidates = match cached {
        Some(products) => products,
        None => {
            let fetched = match state
                .catalog
                .find_candidates(
                    pet.species,
                    category,
                    req.budget,
                    state.limits.candidate_limit as usize,
                )
                .await
            {
                Ok(products) => products,
                Err(e) => {
                    tracing::error!("Failed to fetch candidates for {}: {}", pet.name, e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to fetch candidates".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            };

            if req.budget.is_none() {
                if let Err(e) = state.cache.set(&cache_key, &fetched).await {
                    tracing::warn!("Failed to cache candidates: {}", e);
                }
            }

            fetched
        }
    };

    tracing::debug!("Scoring {} candidates for {}", candidates.len(), pet.name);

    // Run the recommendation pipeline
    let result = state.advisor.recommend(&pet, candidates, top_n);

    let execution_ms = started.elapsed().as_millis() as u64;
    let confidence = if result.recommendations.is_empty() { 0.5 } else { 0.85 };
    let request_id = Uuid::new_v4();

    // Best-effort audit write; a failed record never fails the call
    let input = serde_json::json!({
        "pet": pet,
        "query": req.query,
        "budget": req.budget,
        "topN": top_n,
    });
    let output = serde_json::to_value(&result).unwrap_or_default();

    if let Err(e) = state
        .audit
        .record(NewAnalysisRecord {
            request_id,
            pet_name: pet.name.clone(),
            analysis_type: AnalysisType::Recommendation,
            input: input.clone(),
            output: output.clone(),
            confidence,
            provider: "rule-based".to_string(),
            execution_ms: execution_ms as i64,
        })
        .await
    {
        tracing::warn!("Failed to record audit for {}: {}", pet.name, e);
    }

    // Best-effort vault notification, after the result is final
    state.vault.notify(&pet.name, &input, &output).await;

    tracing::info!(
        "Returning {} recommendations for {} ({} scanned, {} avoided)",
        result.recommendations.len(),
        pet.name,
        result.total_scanned,
        result.avoid.len()
    );

    let total_recommended = result.recommendations.len();
    HttpResponse::Ok().json(RecommendResponse {
        recommendations: result.recommendations,
        avoid: result.avoid,
        general_advice: result.general_advice,
        metadata: RecommendMetadata {
            request_id,
            total_scanned: result.total_scanned,
            total_recommended,
            execution_ms,
            confidence,
        },
    })
}

/// Pet health analysis endpoint
///
/// POST /api/v1/advisor/analyze
///
/// Request body:
/// ```json
/// {
///   "name": "Rex",
///   "species": "dog",
///   "age": 8,
///   "description": "Senior lab, allergic to chicken, mild arthritis",
///   "healthIssues": [],
///   "allergies": []
/// }
/// ```
async fn analyze(state: web::Data<AppState>, req: web::Json<AnalyzeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let Some(species) = req.species else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid input".to_string(),
            message: "pet species is required".to_string(),
            status_code: 400,
        });
    };

    let started = Instant::now();

    // Declared fields win; the extractor fills in what the description adds
    let extracted = state.extractor.extract(&req.description).await;
    let allergies = if req.allergies.is_empty() {
        extracted.allergies
    } else {
        req.allergies.clone()
    };
    let health_issues = if req.health_issues.is_empty() {
        extracted.health_issues
    } else {
        req.health_issues.clone()
    };

    let health_score = profile::health_score(req.age, &health_issues, &allergies);

    let pet = PetProfile {
        name: req.name.clone(),
        species,
        breed: extracted.breed,
        age: req.age,
        weight: None,
        health_score,
        allergies,
        health_issues,
        dietary_restrictions: extracted.dietary_restrictions,
    };

    let analysis = profile::analyze(&pet);

    if let Err(e) = state.cache.set(&CacheKey::analysis(&pet.name), &analysis).await {
        tracing::warn!("Failed to cache analysis: {}", e);
    }

    let execution_ms = started.elapsed().as_millis() as u64;
    let request_id = Uuid::new_v4();

    if let Err(e) = state
        .audit
        .record(NewAnalysisRecord {
            request_id,
            pet_name: pet.name.clone(),
            analysis_type: AnalysisType::Health,
            input: serde_json::json!({
                "description": req.description,
                "age": req.age,
                "species": species,
            }),
            output: serde_json::to_value(&analysis).unwrap_or_default(),
            confidence: 0.9,
            provider: state.extractor.provider().to_string(),
            execution_ms: execution_ms as i64,
        })
        .await
    {
        tracing::warn!("Failed to record audit for {}: {}", pet.name, e);
    }

    HttpResponse::Ok().json(AnalyzeResponse {
        profile: pet,
        analysis,
        metadata: AnalysisMetadata {
            request_id,
            provider: state.extractor.provider().to_string(),
            execution_ms,
        },
    })
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

/// Recommendation history for a pet
///
/// GET /api/v1/advisor/history/{petName}?limit=10
async fn get_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let pet_name = path.into_inner();
    let limit = query.limit.unwrap_or(10).min(100);

    match state.audit.history(&pet_name, limit).await {
        Ok(records) => HttpResponse::Ok().json(serde_json::json!({
            "petName": pet_name,
            "records": records,
            "count": records.len(),
        })),
        Err(e) => {
            tracing::error!("Failed to fetch history for {}: {}", pet_name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch history".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
