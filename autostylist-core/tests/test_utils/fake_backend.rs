// File: autostylist-core/tests/test_utils/fake_backend.rs
//
// In-memory stand-in for the AutoStylist HTTP API, driven through the same
// `HttpClient` seam the real transport uses.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use autostylist_core::http::{HttpClient, HttpRequest, HttpResponse, Method, RequestBody};
use autostylist_core::Error;

const API_ROOT: &str = "http://localhost:8000/api";

#[derive(Debug, Clone)]
struct Account {
    full_name: String,
    password: String,
}

#[derive(Default)]
struct State {
    users: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    /// (owner email, item json)
    items: Vec<(String, Value)>,
    feedback: Vec<Value>,
    fail_feedback: bool,
    requests: Vec<HttpRequest>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

fn reply(status: u16, body: Value) -> HttpResponse {
    HttpResponse::json(status, &body)
}

fn detail(status: u16, msg: &str) -> HttpResponse {
    reply(status, json!({ "detail": msg }))
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub fn feedback(&self) -> Vec<Value> {
        self.state.lock().unwrap().feedback.clone()
    }

    pub fn set_fail_feedback(&self, fail: bool) {
        self.state.lock().unwrap().fail_feedback = fail;
    }

    /// Invalidates every issued token, as a server restart with a new secret would.
    pub fn revoke_all_tokens(&self) {
        self.state.lock().unwrap().tokens.clear();
    }

    pub fn item_count(&self, owner: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|(o, _)| o == owner)
            .count()
    }

    /// Overwrites the detected colours of the `index`-th item `owner` uploaded.
    pub fn set_colors(&self, owner: &str, index: usize, colors: Value) {
        let mut st = self.state.lock().unwrap();
        if let Some((_, item)) = st.items.iter_mut().filter(|(o, _)| o == owner).nth(index) {
            item["colors"] = colors;
        }
    }

    fn route(&self, st: &mut State, req: &HttpRequest) -> HttpResponse {
        let Some(path) = req.url.strip_prefix(API_ROOT) else {
            return detail(404, "Not Found");
        };
        let caller = req
            .header("Authorization")
            .and_then(|h| h.strip_prefix("Bearer "))
            .and_then(|t| st.tokens.get(t).cloned());

        match (req.method, path) {
            (Method::Post, "/auth/register") => Self::register(st, &req.body),
            (Method::Post, "/auth/login") => Self::login(st, &req.body),
            (Method::Get, "/auth/me") => match caller {
                Some(email) => {
                    let acct = &st.users[&email];
                    reply(200, json!({"_id": format!("u-{email}"), "full_name": acct.full_name, "email": email}))
                }
                None => detail(401, "Could not validate credentials"),
            },
            (Method::Post, "/auth/logout") => {
                let Some(token) = req.header("Authorization").and_then(|h| h.strip_prefix("Bearer ")) else {
                    return detail(401, "Not authenticated");
                };
                match st.tokens.remove(token) {
                    Some(_) => reply(200, json!({"message": "Logged out successfully"})),
                    None => detail(401, "Could not validate credentials"),
                }
            }
            (Method::Post, "/upload") => {
                let owner = caller.unwrap_or_else(|| "anonymous".to_string());
                Self::upload(st, owner, &req.body)
            }
            (Method::Post, "/recommend") => {
                let owner = caller.unwrap_or_else(|| "anonymous".to_string());
                Self::recommend(st, &owner, &req.body)
            }
            (Method::Post, "/context") => {
                let occasion = req.body.field("occasion").unwrap_or("casual");
                reply(200, json!({
                    "city": "Pune", "temperature": 28.5, "weather": "Clear",
                    "weather_type": "warm", "occasion": occasion
                }))
            }
            (_, _) if caller.is_none() => detail(401, "Not authenticated"),
            (Method::Post, "/feedback") => {
                if st.fail_feedback {
                    return detail(500, "Database unavailable");
                }
                match &req.body {
                    RequestBody::Json(v) => {
                        st.feedback.push(v.clone());
                        reply(200, json!({"message": "Feedback recorded"}))
                    }
                    _ => detail(422, "Expected a JSON body"),
                }
            }
            (Method::Get, "/stats") => {
                let owner = caller.unwrap_or_default();
                let mut categories: BTreeMap<String, u64> = BTreeMap::new();
                let mut total = 0u64;
                for (_, item) in st.items.iter().filter(|(o, _)| *o == owner) {
                    total += 1;
                    let cat = item["category"].as_str().unwrap_or_default().to_string();
                    *categories.entry(cat).or_default() += 1;
                }
                reply(200, json!({"total": total, "categories": categories}))
            }
            (Method::Get, "/wardrobe") => {
                let owner = caller.unwrap_or_default();
                let items: Vec<&Value> = st.items.iter().filter(|(o, _)| *o == owner).map(|(_, i)| i).collect();
                reply(200, json!({ "items": items }))
            }
            (Method::Get, p) if p.starts_with("/wardrobe/") => {
                let owner = caller.unwrap_or_default();
                let cat = &p["/wardrobe/".len()..];
                let items: Vec<&Value> = st
                    .items
                    .iter()
                    .filter(|(o, i)| *o == owner && i["category"] == cat)
                    .map(|(_, i)| i)
                    .collect();
                reply(200, json!({ "items": items }))
            }
            (Method::Delete, p) if p.starts_with("/wardrobe/") => {
                let owner = caller.unwrap_or_default();
                let id = &p["/wardrobe/".len()..];
                let before = st.items.len();
                st.items.retain(|(o, i)| !(*o == owner && i["_id"] == id));
                if st.items.len() == before {
                    detail(404, "Item not found")
                } else {
                    reply(200, json!({"message": "Item deleted"}))
                }
            }
            _ => detail(404, "Not Found"),
        }
    }

    fn register(st: &mut State, body: &RequestBody) -> HttpResponse {
        let RequestBody::Json(v) = body else {
            return detail(422, "Expected a JSON body");
        };
        let email = v["email"].as_str().unwrap_or_default().to_string();
        if st.users.contains_key(&email) {
            return detail(400, "Email already registered");
        }
        let acct = Account {
            full_name: v["full_name"].as_str().unwrap_or_default().to_string(),
            password: v["password"].as_str().unwrap_or_default().to_string(),
        };
        let out = json!({"_id": format!("u-{email}"), "full_name": acct.full_name, "email": email});
        st.users.insert(email, acct);
        reply(200, out)
    }

    fn login(st: &mut State, body: &RequestBody) -> HttpResponse {
        let (Some(email), Some(password)) = (body.field("username"), body.field("password")) else {
            return detail(422, "field required");
        };
        match st.users.get(email) {
            Some(acct) if acct.password == password => {
                let token = uuid::Uuid::new_v4().to_string();
                st.tokens.insert(token.clone(), email.to_string());
                reply(200, json!({"access_token": token, "token_type": "bearer"}))
            }
            _ => detail(401, "Invalid credentials"),
        }
    }

    fn upload(st: &mut State, owner: String, body: &RequestBody) -> HttpResponse {
        let RequestBody::Multipart { file: Some(file), .. } = body else {
            return detail(422, "file: field required");
        };
        if !["image/jpeg", "image/png", "image/webp"].contains(&file.content_type.as_str()) {
            return detail(400, "Only JPG, PNG, WEBP allowed");
        }
        let id = uuid::Uuid::new_v4().simple().to_string();
        let image = format!("processed/{id}.png");
        let item = json!({
            "_id": id,
            "user_id": owner,
            "category": body.field("category").unwrap_or("top"),
            "style": body.field("style").unwrap_or("casual"),
            "gender": body.field("gender").unwrap_or("male"),
            "image_path": image,
            "colors": [[10, 20, 30]],
            "usage_count": 0,
            "preference_score": 0,
        });
        st.items.push((owner, item));
        reply(200, json!({"message": "Upload successful", "image": image, "colors": [[10, 20, 30]]}))
    }

    fn recommend(st: &State, owner: &str, body: &RequestBody) -> HttpResponse {
        let pick = |cat: &str| -> Vec<Value> {
            st.items
                .iter()
                .filter(|(o, i)| o == owner && i["category"] == cat)
                .map(|(_, i)| json!({"id": i["_id"], "image_path": i["image_path"], "category": i["category"]}))
                .collect()
        };
        let (tops, bottoms, full) = (pick("top"), pick("bottom"), pick("full_body"));
        let shoes = pick("shoes").into_iter().next();

        let mut outfits = Vec::new();
        if let (Some(t), Some(b)) = (tops.first(), bottoms.first()) {
            outfits.push(json!({"top": t, "bottom": b, "full_body": null, "extras": {"shoes": shoes}}));
        }
        if let Some(f) = full.first() {
            outfits.push(json!({"top": null, "bottom": null, "full_body": f, "extras": {"shoes": shoes}}));
        }
        if let (Some(t), Some(b)) = (tops.get(1), bottoms.first()) {
            outfits.push(json!({"top": t, "bottom": b, "full_body": null, "extras": null}));
        }
        if outfits.is_empty() {
            return reply(200, json!({"error": "Not enough wardrobe items for this occasion"}));
        }

        let mut slots = outfits.into_iter();
        let occasion = body.field("occasion").unwrap_or("casual");
        reply(200, json!({
            "recommendations": {
                "best": slots.next(),
                "medium": slots.next(),
                "average": slots.next(),
            },
            "context": {
                "city": "Pune", "temperature": 28.5, "weather": "Clear", "occasion": occasion
            }
        }))
    }
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let mut st = self.state.lock().unwrap();
        st.requests.push(request.clone());
        Ok(self.route(&mut st, &request))
    }
}
